use clap::Subcommand;
use omnicloud_client::PlatformId;

use super::{Session, print_json};

#[derive(Debug, Subcommand)]
pub enum PlatformsCommand {
    /// List platforms visible to the stored token
    List,
    /// Select the platform used by scoped commands
    Select { id: String },
}

pub async fn run(session: &Session, command: PlatformsCommand) -> anyhow::Result<()> {
    match command {
        PlatformsCommand::List => {
            session.context.load().await?;
            let selected = session.context.selected_platform_id();
            for platform in session.context.platforms() {
                let marker = if selected.as_ref().and_then(PlatformId::as_number) == Some(platform.id) {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} {:>4}  {:<24} {}",
                    marker,
                    platform.id,
                    platform.name,
                    platform.status.as_deref().unwrap_or("-")
                );
            }
            Ok(())
        }
        PlatformsCommand::Select { id } => {
            let id = PlatformId::new(id.trim());
            session.context.select_platform(id.clone())?;
            print_json(&serde_json::json!({ "selectedPlatformId": id }))
        }
    }
}
