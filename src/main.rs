use clap::Parser;
use opsboard::cli::{
    db, details, handle_completions, handle_config_init, status, Cli, Commands, ConfigCommands,
};
use opsboard::client::OpsClient;

fn print_output(result: Result<String, Box<dyn std::error::Error>>) -> Result<(), Box<dyn std::error::Error>> {
    let output = result?;
    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => opsboard::cli::serve::run_serve(args).await,
        Commands::Status(args) => match args.upstream.load_config() {
            Ok(config) => match OpsClient::new(&config.upstream) {
                Ok(client) => {
                    let hours = args.hours.unwrap_or(config.poll.repl_error_hours);
                    print_output(status::handle_status(&args, &client, hours).await)
                }
                Err(e) => Err(e.into()),
            },
            Err(e) => Err(e),
        },
        Commands::CheckDb(args) => match args.upstream.upstream_config() {
            Ok(upstream) => match OpsClient::new(&upstream) {
                Ok(client) => print_output(db::handle_check_db(&args, &client).await),
                Err(e) => Err(e.into()),
            },
            Err(e) => Err(e),
        },
        Commands::Details(args) => match args.upstream.upstream_config() {
            Ok(upstream) => match OpsClient::new(&upstream) {
                Ok(client) => print_output(details::handle_details(&args, &client).await),
                Err(e) => Err(e.into()),
            },
            Err(e) => Err(e),
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
