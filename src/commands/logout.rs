use crate::libs::identity::{FileIdentity, Identity};
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let identity = FileIdentity::new()?;
    let Some(user) = identity.current_user() else {
        identity.logout()?;
        msg_info!(Message::NotLoggedIn);
        return Ok(());
    };

    identity.logout()?;
    msg_success!(Message::LoggedOut(user.to_string()));
    Ok(())
}
