use crate::app_data::AppData;

/// Print a signed bearer token for a subject
///
/// Tokens normally come from the external auth service; this one is signed
/// with the same shared secret for local testing.
pub fn issue(
    app_data: &AppData,
    user_id: &str,
    email: Option<&str>,
    ttl_minutes: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = app_data
        .token_provider
        .generate_jwt(user_id, email.map(str::to_owned), ttl_minutes)?;
    println!("{}", token);
    Ok(())
}
