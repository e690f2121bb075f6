use crate::libs::identity::{FileIdentity, Identity};
use crate::libs::messages::Message;
use crate::libs::record::UserId;
use crate::{msg_bail_anyhow, msg_info, msg_success};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(required = true)]
    name: String,
}

pub fn cmd(login_args: LoginArgs) -> Result<()> {
    let name = login_args.name.trim();
    if name.is_empty() {
        msg_bail_anyhow!(Message::EmptyUserId);
    }

    let identity = FileIdentity::new()?;
    let user = UserId::new(name);
    if identity.current_user().as_ref() == Some(&user) {
        msg_info!(Message::AlreadyLoggedIn(user.to_string()));
        return Ok(());
    }

    identity.login(&user)?;
    msg_success!(Message::LoggedIn(user.to_string()));
    Ok(())
}
