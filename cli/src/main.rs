mod cli;

use std::process::ExitCode;

use clap::Parser;
use designer_news_core::{ApiError, DesignerNewsClient};
use log::{debug, error};
use serde_json::Value;

use crate::cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&cli) {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!("Could not format response: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Value, ApiError> {
    let config = cli.client_config()?;
    debug!("Using {} as {}", config.base_url(), config.user_agent());
    let client = DesignerNewsClient::new(config);

    match &cli.command {
        Commands::Me => client.get_user(),
        Commands::Story { id } => client.get_story(id),
        Commands::Top => client.get_top_stories(),
        Commands::Recent => client.get_recent_stories(),
        Commands::UpvoteStory { id } => client.upvote_story(id),
        Commands::CommentStory { id, text } => client.comment_on_story(id, text.as_str()),
        Commands::Search { query } => client.search_for_story(query),
        Commands::Comment { id } => client.get_comment(id),
        Commands::UpvoteComment { id } => client.upvote_comment(id),
        Commands::ReplyComment { id, text } => client.reply_to_comment(id, text.as_str()),
        Commands::Motd => client.get_motd(),
        Commands::UpvoteMotd => client.upvote_motd(),
        Commands::DownvoteMotd => client.downvote_motd(),
    }
}
