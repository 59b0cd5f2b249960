//! Sign-in commands against the mock identity provider.

use anyhow::{Context as _, Result};
use dialoguer::Password;
use storefront_auth::{Identity, MockIdentityProvider, User};

use super::{LoginArgs, RegisterArgs};
use crate::context::Context;

fn identity(ctx: &Context) -> Identity<MockIdentityProvider> {
    Identity::new(MockIdentityProvider::new(ctx.config.auth.latency()))
}

fn password(given: Option<String>, confirm: bool) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }
    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    prompt.interact().context("Failed to read password")
}

/// Run the login command.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let password = password(args.password, false)?;
    let mut identity = identity(ctx);

    ctx.output.debug("Signing in...");
    let user = identity
        .sign_in(&args.email, &password)
        .await
        .context("Sign-in failed")?
        .clone();

    report(&user, identity.session().map(|s| s.token.as_str()), ctx);
    Ok(())
}

/// Run the register command.
pub async fn register(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let password = password(args.password, true)?;
    let mut identity = identity(ctx);

    ctx.output.debug("Creating account...");
    let user = identity
        .register(&args.name, &args.email, &password)
        .await
        .context("Registration failed")?
        .clone();

    report(&user, identity.session().map(|s| s.token.as_str()), ctx);
    Ok(())
}

fn report(user: &User, token: Option<&str>, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "user": user, "token": token }));
        return;
    }
    ctx.output.success(&format!("Signed in as {}", user.name));
    ctx.output.kv("ID", user.id.as_str());
    ctx.output.kv("Email", &user.email);
    if let Some(token) = token {
        ctx.output.debug(&format!("token: {}", token));
    }
}
