// Role management CLI command
// The only way to obtain the first power account

use crate::providers::validation_provider::normalize_email;
use crate::stores::CredentialStore;
use crate::types::internal::RequestContext;
use crate::types::internal::auth::Role;

/// Grant the power role to the account registered under `email`
///
/// # Returns
/// * `Ok(())` - Account promoted (or already power)
/// * `Err(...)` - No such account, or storage failure
pub async fn promote_user(
    credential_store: &CredentialStore,
    email: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("promote");
    let email = normalize_email(email);

    let user = match credential_store.find_by_email(&email).await? {
        Some(user) => user,
        None => {
            println!("❌ Error: No account registered with {}", email);
            return Err(format!("user not found: {}", email).into());
        }
    };

    if user.role == Role::Power.as_str() {
        println!("ℹ️  {} ({}) is already a power user.", user.name, user.id);
        return Ok(());
    }

    credential_store.set_role(user.id, Role::Power).await?;

    tracing::info!(request_id = %ctx.request_id, user_id = user.id, "User promoted from CLI");
    println!("✅ {} ({}) is now a power user.", user.name, user.id);

    Ok(())
}
