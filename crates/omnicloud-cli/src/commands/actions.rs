use clap::Subcommand;
use omnicloud_client::{AcknowledgeAlert, ResolveAlert};

use super::{Session, print_json};

#[derive(Debug, Subcommand)]
pub enum AlertCommand {
    Acknowledge {
        id: String,
        #[arg(long)]
        by: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    Resolve {
        id: String,
        #[arg(long)]
        by: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum BuildCommand {
    Cancel { id: String },
    Retry { id: String },
}

#[derive(Debug, Subcommand)]
pub enum InstanceCommand {
    Start { id: String },
    Stop { id: String },
    Restart { id: String },
}

pub async fn alert(session: &Session, command: AlertCommand) -> anyhow::Result<()> {
    let alerts = session.client.alerts(session.platform_id().await?);
    let alert = match command {
        AlertCommand::Acknowledge { id, by, note } => {
            let request = AcknowledgeAlert {
                acknowledged_by: by,
                note,
            };
            alerts.acknowledge(id, &request).await?
        }
        AlertCommand::Resolve { id, by, note } => {
            let request = ResolveAlert {
                resolved_by: by,
                resolution_note: note,
            };
            alerts.resolve(id, &request).await?
        }
    };
    print_json(&alert)
}

pub async fn build(session: &Session, command: BuildCommand) -> anyhow::Result<()> {
    let builds = session.client.builds(session.platform_id().await?);
    let build = match command {
        BuildCommand::Cancel { id } => builds.cancel(id).await?,
        BuildCommand::Retry { id } => builds.retry(id).await?,
    };
    print_json(&build)
}

pub async fn instance(session: &Session, command: InstanceCommand) -> anyhow::Result<()> {
    let instances = session.client.instances(session.platform_id().await?);
    let instance = match command {
        InstanceCommand::Start { id } => instances.start(id).await?,
        InstanceCommand::Stop { id } => instances.stop(id).await?,
        InstanceCommand::Restart { id } => instances.restart(id).await?,
    };
    print_json(&instance)
}
