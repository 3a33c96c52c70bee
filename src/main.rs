use anyhow::Result;
use clap::Parser;
use notify_types::NotificationContent;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "flipclip-notify", version)]
#[command(about = "Show a transient notification in the top-right corner", long_about = None)]
struct Cli {
    /// Title [default: FlipClip], message (omitted when empty) and seconds
    /// before fading out (non-numeric values use 2.0). Anything after the
    /// third value is ignored.
    #[arg(value_name = "TITLE MESSAGE DURATION", trailing_var_arg = true, allow_hyphen_values = true)]
    params: Vec<String>,
}

impl Cli {
    fn into_content(self) -> NotificationContent {
        let mut params = self.params.into_iter();
        let title = params.next();
        let message = params.next();
        let duration = params.next();

        NotificationContent::from_params(title, message, duration.as_deref())
    }
}

fn main() -> Result<()> {
    let content = Cli::parse().into_content();

    notify_overlay::init_logging();
    debug!("Parameters after defaults: {:?}", content.to_args());

    notify_overlay::run(content)
}
