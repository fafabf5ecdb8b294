use clap::Parser;
use designer_news_core::{ApiError, ClientConfig};

#[derive(Parser, Debug)]
#[command(
    name = "dn",
    version,
    about = "Command-line client for the Designer News API."
)]
pub struct Cli {
    /// OAuth access token sent as `Authorization: Bearer <token>`.
    #[arg(long, env = "DESIGNER_NEWS_ACCESS_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// API version segment, e.g. `v1`.
    #[arg(long, env = "DESIGNER_NEWS_API_VERSION", global = true)]
    pub api_version: Option<String>,

    /// User-Agent header to send.
    #[arg(long, env = "DESIGNER_NEWS_USER_AGENT", global = true)]
    pub user_agent: Option<String>,

    /// Base URL of the API host (without `/api/<version>`).
    #[arg(long, env = "DESIGNER_NEWS_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Log each request at debug level.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Show the authorized user.
    Me,

    /// Show a story and its comments.
    Story {
        #[arg(help = "Story id", required = true)]
        id: String,
    },

    /// List the front page stories.
    Top,

    /// List the most recent stories.
    Recent,

    /// Upvote a story.
    UpvoteStory {
        #[arg(help = "Story id", required = true)]
        id: String,
    },

    /// Post a comment on a story.
    CommentStory {
        #[arg(help = "Story id", required = true)]
        id: String,

        #[arg(help = "Comment text", required = true)]
        text: String,
    },

    /// Search stories by title.
    Search {
        #[arg(help = "Search terms", required = true)]
        query: String,
    },

    /// Show a comment.
    Comment {
        #[arg(help = "Comment id", required = true)]
        id: String,
    },

    /// Upvote a comment.
    UpvoteComment {
        #[arg(help = "Comment id", required = true)]
        id: String,
    },

    /// Reply to a comment.
    ReplyComment {
        #[arg(help = "Comment id", required = true)]
        id: String,

        #[arg(help = "Reply text", required = true)]
        text: String,
    },

    /// Show the message of the day.
    Motd,

    /// Upvote the message of the day.
    UpvoteMotd,

    /// Downvote the message of the day.
    DownvoteMotd,
}

impl Cli {
    /// Client configuration from the flags (or their environment variables).
    /// A missing token is reported by `ClientConfig::new`.
    pub fn client_config(&self) -> Result<ClientConfig, ApiError> {
        let mut config = ClientConfig::new(self.token.clone().unwrap_or_default())?;
        if let Some(segment) = &self.api_version {
            config = config.with_api_version_segment(segment.as_str());
        }
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent.as_str());
        }
        if let Some(endpoint) = &self.endpoint {
            config = config.with_api_endpoint(endpoint);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_story_subcommand() {
        let cli = Cli::try_parse_from(["dn", "--token", "t", "story", "42"]).unwrap();
        assert_eq!(cli.command, Commands::Story { id: "42".to_string() });
    }

    #[test]
    fn global_flags_may_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["dn", "comment-story", "7", "hi there", "--token", "t", "-v"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Commands::CommentStory {
                id: "7".to_string(),
                text: "hi there".to_string()
            }
        );
    }

    #[test]
    fn flags_build_the_client_config() {
        let cli = Cli::try_parse_from([
            "dn",
            "--token",
            "abc",
            "--api-version",
            "v2",
            "--user-agent",
            "dn-tests",
            "--endpoint",
            "http://localhost:3000/",
            "motd",
        ])
        .unwrap();
        let config = cli.client_config().unwrap();
        assert_eq!(config.access_token(), "abc");
        assert_eq!(config.api_version_segment(), "v2");
        assert_eq!(config.user_agent(), "dn-tests");
        assert_eq!(config.base_url(), "http://localhost:3000/api/v2");
    }

    #[test]
    fn empty_token_is_a_configuration_error() {
        let cli = Cli::try_parse_from(["dn", "--token", "", "me"]).unwrap();
        assert!(matches!(cli.client_config(), Err(ApiError::Configuration(_))));
    }

    #[test]
    fn missing_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["dn", "--token", "t"]).is_err());
    }
}
