use clap::{ArgAction, Parser, Subcommand, ValueHint};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    arg_required_else_help = true
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Provide custom config file
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<String>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all the registries
    #[clap(name = "ls", visible_alias = "list")]
    List,

    /// Show current registry name or URL
    Current {
        /// Show the registry URL instead of the name
        #[arg(required = false, short = 'u', long)]
        show_url: bool,
    },

    /// Change current registry
    Use {
        /// Registry to use. Prompts for one when omitted
        name: Option<String>,

        /// Write to the .npmrc of the current directory
        #[arg(required = false, short, long)]
        local: bool,
    },

    /// Add custom registry
    #[command(arg_required_else_help = true)]
    Add {
        /// Name of the registry
        name: String,

        /// Registry url
        #[arg(value_hint = ValueHint::Url)]
        url: String,

        /// Homepage of the registry
        #[arg(value_hint = ValueHint::Url)]
        home: Option<String>,
    },

    /// Set authorize information for a custom registry with a base64 encoded
    /// string or username and password
    #[command(arg_required_else_help = true)]
    Login {
        /// Custom registry name
        name: String,

        /// Base64 encoded credential
        credential: Option<String>,

        /// Set is always auth
        #[arg(required = false, short, long)]
        always_auth: bool,

        /// Your user name for this registry
        #[arg(required = false, short, long)]
        username: Option<String>,

        /// Your password for this registry
        #[arg(required = false, short, long)]
        password: Option<String>,

        /// Your email for this registry
        #[arg(required = false, short, long)]
        email: Option<String>,
    },

    /// Set hosted npm repository for a custom registry to publish package
    #[command(arg_required_else_help = true)]
    #[clap(name = "set-hosted-repo", visible_alias = "set-repository")]
    SetHostedRepo {
        /// Custom registry name
        name: String,

        /// Repository url
        #[arg(value_hint = ValueHint::Url)]
        repo: String,
    },

    /// Associating a scope with a registry
    #[command(arg_required_else_help = true)]
    SetScope {
        /// Scope name, such as @myorg
        scope: String,

        /// Registry url for the scope
        #[arg(value_hint = ValueHint::Url)]
        url: String,
    },

    /// Remove a scope
    #[command(arg_required_else_help = true)]
    #[clap(name = "del-scope", visible_alias = "delete-scope")]
    DelScope {
        /// Scope name
        scope: String,
    },

    /// Set a custom registry attribute
    #[command(arg_required_else_help = true)]
    #[clap(name = "set", visible_alias = "set-attribute")]
    Set {
        /// Custom registry name
        name: String,

        /// Set a custom registry attribute
        #[arg(short, long)]
        attr: String,

        /// Set a custom registry value
        #[arg(short = 'V', long)]
        value: String,
    },

    /// Change custom registry name
    #[command(arg_required_else_help = true)]
    Rename {
        /// Current name
        name: String,

        /// New name
        new_name: String,
    },

    /// Delete custom registries
    #[clap(name = "del", visible_alias = "delete")]
    Del {
        /// Registries to delete. Prompts for a selection when omitted
        names: Vec<String>,
    },

    /// Open the homepage of registry with optional browser
    #[command(arg_required_else_help = true)]
    Home {
        /// Registry name
        name: String,

        /// Browser executable to open the homepage with
        browser: Option<String>,
    },

    /// Show response time for specific or all registries
    Test {
        /// Registry to test
        registry: Option<String>,
    },

    /// Print the configuration file to stdout
    Config,

    /// Generate default config
    #[clap(name = "defconfig")]
    DefConfig,
}
