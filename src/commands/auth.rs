use anyhow::{Context as _, Result};
use dialoguer::Input;
use owo_colors::OwoColorize;
use rpassword::prompt_password;

use crate::commands::Context;

pub fn login(ctx: &mut Context, username: Option<String>) -> Result<()> {
    if ctx.authenticated() {
        println!("{}", "Already logged in.".dimmed());
        return Ok(());
    }

    let username = match username {
        Some(username) => username,
        None => Input::<String>::new().with_prompt("Username").interact_text()?,
    };
    let password = prompt_password("Password: ").context("Failed to read password")?;

    ctx.session.login(username.trim(), &password)?;

    println!("{} Private events are now visible.", "Logged in.".green());
    Ok(())
}

pub fn logout(ctx: &mut Context) -> Result<()> {
    ctx.session.logout();

    println!("{}", "Logged out.".green());
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<()> {
    if ctx.authenticated() {
        println!("Logged in");
    } else {
        println!("Not logged in {}", "(run `hackdeck login`)".dimmed());
    }

    Ok(())
}
