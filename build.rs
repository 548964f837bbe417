use std::env;
use std::fs;
use std::path::Path;

/// Claves que `config.rs` lee con `option_env!`
const CONFIG_KEYS: &[&str] = &[
    "API_BASE_URL",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "TOKEN_STORAGE_KEY",
    "INACTIVITY_MINUTES",
    "WARNING_SECONDS",
    "LOGOUT_REDIRECT_DELAY_MS",
    "UNAUTHORIZED_REDIRECT_DELAY_MS",
    "ERROR_DISMISS_MS",
];

fn main() {
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    // Variables de .env -> rustc-env (las del entorno tienen prioridad)
    let env_file = Path::new(".env");
    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                let Some((key, value)) = line.split_once('=') else {
                    continue;
                };
                let key = key.trim();
                let value = value.trim().trim_matches('"');

                if !CONFIG_KEYS.contains(&key) {
                    println!("cargo:warning=Clave desconocida en .env ignorada: {}", key);
                    continue;
                }

                if env::var(key).is_err() {
                    println!("cargo:rustc-env={}={}", key, value);
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found. Using default values.");
    }

    println!("cargo:rerun-if-changed=build.rs");
}
