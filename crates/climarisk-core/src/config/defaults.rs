// Single source of truth for all default values.

// --- Cache ---
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300; // 5 minutes
pub const DEFAULT_PROVIDER_TTL_SECS: u64 = 3600; // 1 hour
pub const DEFAULT_RESULT_TTL_SECS: u64 = 300;
pub const DEFAULT_CACHE_KEY_PRECISION: u32 = 4;
pub const DEFAULT_SQLITE_CACHE_FILENAME: &str = "climarisk-cache.db";

// --- Resilience ---
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 1_000;
pub const DEFAULT_EXPONENTIAL_BASE: f64 = 2.0;
pub const DEFAULT_MAX_DELAY_MS: u64 = 60_000;
pub const DEFAULT_JITTER: bool = true;
pub const DEFAULT_JITTER_FRACTION: f64 = 0.25;
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;
pub const DEFAULT_RECOVERY_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 30_000;

// --- Providers ---
pub const DEFAULT_CLIMATE_PROJECTION_URL: &str = "http://pclima.inpe.br/analise/API";
pub const DEFAULT_HYDROLOGICAL_URL: &str = "https://www.ana.gov.br/hidrowebservice";
pub const DEFAULT_OCCURRENCE_HISTORY_URL: &str = "http://www2.cemaden.gov.br/api";
pub const DEFAULT_STATION_RADIUS_KM: f64 = 50.0;
pub const DEFAULT_MUNICIPALITY_RADIUS_KM: f64 = 30.0;

// --- Calculator ---
pub const DEFAULT_WORKER_THREADS: usize = 4;
pub const DEFAULT_BASELINE_YEAR: u16 = 2024;
pub const DEFAULT_GEOGRAPHIC_WEIGHT: f64 = 0.6;
pub const DEFAULT_HAZARD_WEIGHT: f64 = 0.10;
pub const DEFAULT_HAZARD_WEIGHTS: [(&str, f64); 5] = [
    ("flood", 0.40),
    ("drought", 0.30),
    ("heat_stress", 0.20),
    ("landslide", 0.05),
    ("coastal_inundation", 0.05),
];
pub const DEFAULT_BASE_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_BASE_CONFIDENCES: [(&str, f64); 5] = [
    ("flood", 0.50),
    ("drought", 0.55),
    ("heat_stress", 0.60),
    ("landslide", 0.45),
    ("coastal_inundation", 0.50),
];
pub const DEFAULT_LIVE_CONFIDENCE_BONUS: f64 = 0.20;
pub const DEFAULT_CONFIDENCE_CAP: f64 = 0.85;
pub const DEFAULT_DEGRADED_CONFIDENCE_PENALTY: f64 = 0.10;

// Scenario multipliers (2030, 2050).
pub const DEFAULT_MULTIPLIERS_LOW: (f64, f64) = (1.10, 1.20);
pub const DEFAULT_MULTIPLIERS_MODERATE: (f64, f64) = (1.15, 1.35);
pub const DEFAULT_MULTIPLIERS_HIGH: (f64, f64) = (1.25, 1.60);

// Sensitivity factors.
pub const DEFAULT_HEAT_PER_DEGREE: f64 = 0.15;
pub const DEFAULT_COASTAL_PER_DEGREE: f64 = 0.10;
pub const DEFAULT_DROUGHT_PER_PCT: f64 = 0.01;
pub const DEFAULT_WET_HAZARD_PER_PCT: f64 = 0.008;

// Heat stress latitude gradient: base + ((offset + lat) / span) * gradient.
pub const DEFAULT_HEAT_BASE: f64 = 0.30;
pub const DEFAULT_HEAT_LATITUDE_OFFSET: f64 = 10.0;
pub const DEFAULT_HEAT_LATITUDE_SPAN: f64 = 40.0;
pub const DEFAULT_HEAT_GRADIENT: f64 = 0.40;
pub const DEFAULT_HEAT_NOISE: f64 = 0.10;

// --- Grid ---
pub const DEFAULT_MIN_RESOLUTION: u8 = 5;
pub const DEFAULT_MAX_RESOLUTION: u8 = 9;
pub const DEFAULT_GRID_RESOLUTION: u8 = 7;
pub const DEFAULT_DECAY_COEFFICIENT: f64 = 0.3;
pub const DEFAULT_BASE_RISK: f64 = 0.5;
pub const DEFAULT_EDGE_LENGTH_KM: f64 = 1.0;
pub const DEFAULT_EDGE_LENGTHS_KM: [(u8, f64); 5] = [
    (5, 8.544),
    (6, 3.229),
    (7, 1.220),
    (8, 0.461),
    (9, 0.174),
];
pub const DEFAULT_HIGH_RISK_THRESHOLD: f64 = 0.7;
pub const DEFAULT_MEDIUM_RISK_THRESHOLD: f64 = 0.4;
pub const DEFAULT_SCORE_PRECISION: u32 = 3;
pub const DEFAULT_MAX_GRID_CELLS: usize = 10_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
