use clap::{Parser, Subcommand};
use followup_client::{
    api::{RemarksApi, RemarksClient},
    config::Config,
    controller::{Controller, Notifier},
    repl::{parse_input, Input, HELP},
    session::EditField,
    telephony::SystemDialer,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every customer the service returns
    List,

    /// Work through the customers one at a time
    Session,
}

struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        println!("*** {} ***", message);
    }
}

type TerminalController = Controller<RemarksClient, SystemDialer, TerminalNotifier>;

async fn run_session(mut controller: TerminalController) -> anyhow::Result<()> {
    // both failures are logged; the session starts with whatever is available
    let _ = controller.load_reasons().await;
    let _ = controller.load_customers().await;
    println!("{}\n", controller.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match input {
            Input::Show => println!("{}", controller.view()),
            Input::Call => {
                if !controller.initiate_call() {
                    println!("Nothing to call");
                }
            }
            Input::Next => {
                if controller.next_customer() {
                    println!("{}", controller.view());
                }
            }
            Input::Select(index) => {
                controller.select_customer(index);
                println!("{}", controller.view());
            }
            Input::Remarks(text) => {
                controller.record_edit(EditField::Remarks(text))
            }
            Input::OpenPicker(field) => {
                controller.open_picker(field);
                println!("Enter: date YYYY-MM-DD, or cancel");
            }
            Input::Date(date) => {
                if let Err(e) = controller.confirm_date(date) {
                    println!("{}", e);
                }
            }
            Input::Cancel => controller.cancel_picker(),
            Input::Reasons => {
                for (n, reason) in controller.reasons().iter().enumerate() {
                    println!("{:>2}. {}", n + 1, reason);
                }
            }
            Input::Reason { index, not_coming } => {
                if !controller.select_reason(index, not_coming) {
                    println!("No such reason");
                }
            }
            Input::Save => {
                if controller.submit_remarks().await.is_ok() {
                    println!("{}", controller.view());
                }
            }
            Input::Reload => {
                let _ = controller.load_customers().await;
                println!("{}", controller.view());
            }
            Input::Help => println!("{}", HELP),
            Input::Quit => break,
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let client = RemarksClient::new(config.api_url.clone());
    info!("Using remarks service at {}", config.api_url);

    match cli.command {
        Commands::List => {
            for customer in client.fetch_customers().await? {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    customer.id,
                    customer.name.unwrap_or_default(),
                    customer.mobno.unwrap_or_default(),
                    customer.jc_no.unwrap_or_default(),
                    customer.model.unwrap_or_default(),
                );
            }
        }
        Commands::Session => {
            let dialer = SystemDialer::new(config.dialer_command.clone());
            let controller = Controller::new(client, dialer, TerminalNotifier, &config);
            run_session(controller).await?;
        }
    }

    Ok(())
}
