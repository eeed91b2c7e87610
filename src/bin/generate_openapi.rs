//! Writes the service's OpenAPI document.
//!
//! Usage:
//!   cargo run --bin generate_openapi > openapi.json
//!   cargo run --bin generate_openapi -- --output openapi.json

use std::{
    env, fs,
    io::{self, Write},
    path::PathBuf,
    process,
};

use esp32_sensor_api::api::handlers::ApiDoc;
use utoipa::OpenApi;

fn main() {
    let json = match ApiDoc::openapi().to_pretty_json() {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Failed to serialise OpenAPI document: {e}");
            process::exit(1);
        }
    };

    let output_path = parse_output_path(env::args().collect());

    let result = match &output_path {
        Some(path) => fs::write(path, &json),
        None => io::stdout().write_all(json.as_bytes()),
    };

    match (result, output_path) {
        (Ok(()), Some(path)) => eprintln!("OpenAPI document written to {}", path.display()),
        (Ok(()), None) => {}
        (Err(e), _) => {
            eprintln!("Error writing OpenAPI document: {e}");
            process::exit(1);
        }
    }
}

/// Value following `--output`, if any.
fn parse_output_path(args: Vec<String>) -> Option<PathBuf> {
    args.windows(2)
        .find(|w| w[0] == "--output")
        .map(|w| PathBuf::from(&w[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn output_flag_is_optional() {
        assert_eq!(parse_output_path(args(&["generate_openapi"])), None);
        assert_eq!(
            parse_output_path(args(&["generate_openapi", "--output", "openapi.json"])),
            Some(PathBuf::from("openapi.json"))
        );
    }

    #[test]
    fn document_lists_channel_routes() {
        let doc = ApiDoc::openapi();
        for path in [
            "/enviar_sensor_{channel}",
            "/ultimo_sensor_{channel}",
            "/historico_sensor_{channel}",
            "/limpar_sensor_{channel}",
            "/limpar_todas_tabelas",
            "/excluir_todas_tabelas",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
