use clap::Parser;
use cloudant_crud::action::{Action, Outcome};
use cloudant_crud::common::Params;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "cloudant-action")]
#[command(about = "Run one Cloudant CRUD action and print its result", long_about = None)]
struct Cli {
    /// Action to run
    #[arg(value_enum)]
    action: Action,

    /// Invocation parameters as a JSON object; read from stdin when omitted
    params: Option<String>,
}

/// Parameters from the argument, or from `input` when there is none.
async fn read_params<R>(
    argument: Option<String>,
    mut input: R,
) -> Result<Params, Box<dyn std::error::Error>>
where
    R: AsyncRead + Unpin,
{
    let params = match argument {
        Some(params) => params,
        None => {
            let mut params = String::new();
            input.read_to_string(&mut params).await?;
            params
        }
    };
    Ok(serde_json::from_str(&params)?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the result only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cloudant_crud=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let params = read_params(cli.params, tokio::io::stdin()).await?;

    let client = reqwest::Client::new();
    let outcome: Outcome = cli.action.invoke(&client, &params).await;
    println!("{}", serde_json::to_string(&outcome)?);
    Ok(())
}
