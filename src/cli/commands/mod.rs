use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("adgang")
        .about("Passwordless authentication and identity anonymization hooks")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("ADGANG_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("hash-salt")
                .long("hash-salt")
                .help("Salt for pseudonym hashing of external-provider subjects")
                .env("ADGANG_HASH_SALT")
                .required(true),
        )
        .arg(
            Arg::new("anonymous-domain")
                .long("anonymous-domain")
                .help("Domain of synthetic account handles")
                .default_value("feide.anonymous")
                .env("ADGANG_ANONYMOUS_DOMAIN"),
        )
        .arg(
            Arg::new("external-provider")
                .long("external-provider")
                .help("Federated identity provider whose sign-ups are anonymized")
                .default_value("Feide")
                .env("ADGANG_EXTERNAL_PROVIDER"),
        )
        .arg(
            Arg::new("admin-emails")
                .long("admin-emails")
                .help("Comma-separated privileged account allow-list")
                .env("ADGANG_ADMIN_EMAILS"),
        )
        .arg(
            Arg::new("admin-group")
                .long("admin-group")
                .help("Group granted to allow-listed accounts on confirmation")
                .default_value("admin")
                .env("ADGANG_ADMIN_GROUP"),
        )
        .arg(
            Arg::new("from-email")
                .long("from-email")
                .help("Sender address for login code emails")
                .default_value("noreply@fagfilm.no")
                .env("ADGANG_FROM_EMAIL"),
        )
        .arg(
            Arg::new("relay-url")
                .long("relay-url")
                .help("Email relay endpoint; without it login codes are only logged")
                .env("ADGANG_RELAY_URL"),
        )
        .arg(
            Arg::new("directory-url")
                .long("directory-url")
                .help("Identity store admin endpoint for group grants; without it grants are only logged")
                .env("ADGANG_DIRECTORY_URL"),
        )
        .arg(
            Arg::new("directory-token")
                .long("directory-token")
                .help("Bearer token for the identity store admin endpoint")
                .env("ADGANG_DIRECTORY_TOKEN"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("ADGANG_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}
