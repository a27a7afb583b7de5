use crate::{Res, auth::authorize, config::Settings, success};

pub async fn auth() -> Res<()> {
    let settings = Settings::from_env()?;
    authorize(&settings).await?;
    success!("Authentication successful!");
    Ok(())
}
