use serde_json::{json, Value};
use uuid::Uuid;

use crate::cli::OutputFormat;
use crate::database::models::{Account, Booth};
use crate::error::BoothError;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(body)) = (data, response.as_object_mut()) {
                body.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(output_format: &OutputFormat, message: &str, error_code: Option<&str>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(output_format: &OutputFormat, collection_name: &str, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ collection_name: [] }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

pub fn output_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Match an account argument by id or case-insensitive name
pub fn find_account<'a>(accounts: &'a [Account], target: &str) -> Result<&'a Account, BoothError> {
    let by_id = Uuid::parse_str(target).ok();
    accounts
        .iter()
        .find(|a| Some(a.id) == by_id || a.name_matches(target))
        .ok_or_else(|| BoothError::not_found(format!("account '{}'", target)))
}

/// Match a booth argument by id or case-insensitive name
pub fn find_booth<'a>(booths: &'a [Booth], target: &str) -> Result<&'a Booth, BoothError> {
    let by_id = Uuid::parse_str(target).ok();
    let lowered = target.to_lowercase();
    booths
        .iter()
        .find(|b| Some(b.id) == by_id || b.name.to_lowercase() == lowered)
        .ok_or_else(|| BoothError::not_found(format!("booth '{}'", target)))
}
