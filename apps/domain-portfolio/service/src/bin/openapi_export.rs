use std::io::Write;

use domain_portfolio_service::openapi::openapi_document;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let document = openapi_document();
    let encoded = serde_json::to_string_pretty(&document)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(encoded.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}
