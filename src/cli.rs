use clap::{Parser, Subcommand};
use kisan_mitra_common::{CategoryFilter, Language};

#[derive(Parser)]
#[command(name = "kisan-mitra")]
#[command(about = "Multilingual plant health assistant for farmers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show one scan report, optionally in another language
    Report {
        /// Scan report id
        #[arg(required = true)]
        id: String,

        /// Display language (english/hindi/bengali)
        #[arg(short, long)]
        lang: Option<Language>,
    },

    /// List scan reports with a health summary
    Reports,

    /// Show daily farming tips
    Tips {
        /// Category (disease_prevention/fertilizer/watering/pest_control/seasonal/all)
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,

        /// Tip language (defaults to the saved preference)
        #[arg(short, long)]
        lang: Option<Language>,
    },

    /// Ask the farming assistant (interactive when no message is given)
    Chat {
        /// Resume an existing session
        #[arg(short, long)]
        session: Option<String>,

        /// Messages to send, in order
        messages: Vec<String>,
    },

    /// Diagnose a plant from a hosted photograph
    Diagnose {
        /// Image URL
        #[arg(required = true)]
        image_url: String,

        /// Report language (defaults to the saved preference)
        #[arg(short, long)]
        lang: Option<Language>,
    },

    /// Show or change preferences
    Settings {
        /// Preferred language
        #[arg(long)]
        language: Option<Language>,

        /// Daily tip notifications (on/off)
        #[arg(long)]
        notifications: Option<Toggle>,

        /// Read reports aloud automatically (on/off)
        #[arg(long)]
        auto_voice: Option<Toggle>,

        /// Show preferences
        #[arg(long)]
        show: bool,
    },

    /// Show or edit connection settings
    Config {
        /// Set the API key
        #[arg(long)]
        set_api_key: Option<String>,

        /// Set the app id
        #[arg(long)]
        set_app_id: Option<String>,

        /// Show configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        self == Toggle::On
    }
}

impl std::str::FromStr for Toggle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "on" | "true" | "yes" => Ok(Toggle::On),
            "off" | "false" | "no" => Ok(Toggle::Off),
            _ => Err(format!("Unknown value: {}. Use on or off", s)),
        }
    }
}
