use std::fmt::{Debug, Display};

use cipet_creative::cipet_web_server::CipetWebServer;
use cipet_creative::core::{get_subscriber, init_subscriber, AppConfig};
use tokio::task::JoinError;

use colored::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let file_appender = tracing_appender::rolling::daily("./logs", "cipet_creative");

    let subscriber = get_subscriber("cipet_creative".into(), "info".into(), file_appender);
    init_subscriber(subscriber);

    let config = AppConfig::new()?;

    let cipet_web_server = CipetWebServer::build(config.clone()).await?;
    let port = cipet_web_server.port();

    let server_task = tokio::spawn(cipet_web_server.run_until_stopped());

    println!("{}", "-----------------------------------------".green());
    println!(
        "🚀 Server started on Addr: {}:{}",
        config.cipet_server_config.host, port
    );
    println!("{}", "-----------------------------------------".green());

    tokio::select! {
        o = server_task => {report_exit("API", o);}
    }
    Ok(())
}

fn report_exit(task_name: &str, outcome: Result<Result<(), impl Debug + Display>, JoinError>) {
    match outcome {
        Ok(Ok(())) => {
            tracing::info!("{} has exited", task_name)
        }
        Ok(Err(e)) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} failed",
                task_name
            )
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{}' task failed to complete",
                task_name
            )
        }
    }
}
