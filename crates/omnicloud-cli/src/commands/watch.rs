use std::time::Duration;

use clap::Subcommand;
use omnicloud_client::Instance;
use omnicloud_dashboard::{DashboardState, InstanceMonitor, ListView};
use tracing::info;

use super::Session;

#[derive(Debug, Subcommand)]
pub enum WatchTarget {
    /// Poll the instance list until interrupted
    Instances {
        #[arg(long, default_value_t = 30)]
        interval_secs: u64,
    },
}

pub async fn run(session: &Session, target: WatchTarget) -> anyhow::Result<()> {
    match target {
        WatchTarget::Instances { interval_secs } => {
            let platform_id = session.platform_id().await?;
            let state = DashboardState::new("instances".to_string());
            let view: ListView<Instance> =
                if session.context.selected_platform_id().as_ref() == Some(&platform_id) {
                    ListView::scoped(session.client.http().clone(), session.context.clone(), state)
                } else {
                    ListView::fixed(session.client.instances(platform_id.clone()), state)
                };

            let interval = Duration::from_secs(interval_secs.max(1));
            info!(platform_id = %platform_id, "Watching instances every {:?}", interval);

            let monitor = InstanceMonitor::start_with(view, interval, |view| {
                print_instances(&view.items())
            });

            tokio::signal::ctrl_c().await?;
            monitor.stop().await;
            Ok(())
        }
    }
}

fn print_instances(instances: &[Instance]) {
    println!("{:>6}  {:<24} {:<14} {:>6} {:>6}", "ID", "NAME", "STATUS", "CPU%", "MEM%");
    for instance in instances {
        println!(
            "{:>6}  {:<24} {:<14} {:>6} {:>6}",
            instance.id,
            instance.name,
            instance.status.label(),
            percent(instance.cpu_usage),
            percent(instance.memory_usage)
        );
    }
    println!();
}

fn percent(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".to_string())
}
