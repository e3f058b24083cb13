mod error;
#[cfg_attr(not(windows), allow(dead_code))]
mod registry;
mod win;

use std::process;

use clap::{App, Arg, ArgMatches};
use colored::Colorize;

use error::RegistryAccessError;
use win::RootKey;

const EXIT_OK: i32 = 0;
const EXIT_ERROR: i32 = 1;

const DEFAULT_SUB_KEY: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion";
const DEFAULT_VALUE_NAME: &str = "CommonFilesDir";

fn main() {
    env_logger::init();

    let matches = app().get_matches();

    let code = match run(&matches) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            report_error(&e);
            EXIT_ERROR
        }
    };

    process::exit(code);
}

fn app() -> App<'static, 'static> {
    App::new("regstr")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reads a string value from the Windows registry")
        .arg(
            Arg::with_name("root")
                .long("root")
                .short("r")
                .takes_value(true)
                .default_value("HKLM")
                .help("Predefined key to start from (HKLM, HKEY_LOCAL_MACHINE, ...)"),
        )
        .arg(
            Arg::with_name("subkey")
                .long("subkey")
                .short("k")
                .takes_value(true)
                .default_value(DEFAULT_SUB_KEY)
                .help("Path of the sub-key, relative to the root"),
        )
        .arg(
            Arg::with_name("value")
                .long("value")
                .short("n")
                .takes_value(true)
                .default_value(DEFAULT_VALUE_NAME)
                .help("Name of the value, empty for the default value"),
        )
}

fn root_key(matches: &ArgMatches) -> anyhow::Result<RootKey> {
    matches.value_of("root").unwrap_or("HKLM").parse()
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let root = root_key(matches)?;
    let sub_key = matches.value_of("subkey");
    let value_name = matches.value_of("value");

    log::info!(
        "reading {}\\{}, value {:?}",
        root,
        sub_key.unwrap_or(""),
        value_name.unwrap_or("")
    );

    let text = read(root, sub_key, value_name)?;
    print!("{}", format_value(&text));

    Ok(())
}

fn format_value(text: &str) -> String {
    let len = text.chars().count();
    format!(
        "String read from registry:\n\n  \"{}\"\n   {}\n\n(Length = {})\n\n",
        text,
        "*".repeat(len),
        len
    )
}

fn format_error(e: &RegistryAccessError) -> String {
    format!("\n*** ERROR: HResult=0x{:08X}", e.hresult())
}

#[cfg(windows)]
fn read(
    root: RootKey,
    sub_key: Option<&str>,
    value_name: Option<&str>,
) -> Result<String, RegistryAccessError> {
    registry::read_string(&root.key(), sub_key, value_name)
}

#[cfg(not(windows))]
fn read(
    _root: RootKey,
    _sub_key: Option<&str>,
    _value_name: Option<&str>,
) -> Result<String, RegistryAccessError> {
    Err(RegistryAccessError::from_win32(
        error::ERROR_CALL_NOT_IMPLEMENTED,
    ))
}

fn report_error(e: &anyhow::Error) {
    match e.downcast_ref::<RegistryAccessError>() {
        Some(e) => {
            if let Some(message) = win::format_message(e.hresult()) {
                log::error!("{}", message);
            }
            println!("{}", format_error(e).red());
        }
        None => eprintln!("{} {}", "error:".red(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_arguments() {
        let matches = app().get_matches_from_safe(vec!["regstr"]).unwrap();

        assert_eq!(root_key(&matches).unwrap(), RootKey::LocalMachine);
        assert_eq!(matches.value_of("subkey"), Some(DEFAULT_SUB_KEY));
        assert_eq!(matches.value_of("value"), Some(DEFAULT_VALUE_NAME));
    }

    #[test]
    fn test_long_root_name() {
        let matches = app()
            .get_matches_from_safe(vec!["regstr", "--root", "HKEY_LOCAL_MACHINE"])
            .unwrap();

        assert_eq!(root_key(&matches).unwrap(), RootKey::LocalMachine);
    }

    #[test]
    fn test_root_name_case() {
        let matches = app()
            .get_matches_from_safe(vec!["regstr", "-r", "hkey_current_user"])
            .unwrap();

        assert_eq!(root_key(&matches).unwrap(), RootKey::CurrentUser);
    }

    #[test]
    fn test_unknown_root() {
        let matches = app()
            .get_matches_from_safe(vec!["regstr", "--root", "HKXX"])
            .unwrap();

        let err = root_key(&matches).unwrap_err();
        assert!(err.downcast_ref::<RegistryAccessError>().is_none());
        assert_eq!(err.to_string(), "unknown registry root: HKXX");
    }

    #[test]
    fn test_empty_value_name() {
        let matches = app()
            .get_matches_from_safe(vec!["regstr", "--value", ""])
            .unwrap();

        assert_eq!(matches.value_of("value"), Some(""));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(
            format_value(r"C:\Program Files\Common Files"),
            "String read from registry:\n\n  \"C:\\Program Files\\Common Files\"\n   *****************************\n\n(Length = 29)\n\n"
        );
    }

    #[test]
    fn test_format_value_non_ascii() {
        let out = format_value("Dateien für Ü");

        assert!(out.contains("\n   *************\n"));
        assert!(out.contains("(Length = 13)"));
    }

    #[test]
    fn test_format_empty_value() {
        assert_eq!(
            format_value(""),
            "String read from registry:\n\n  \"\"\n   \n\n(Length = 0)\n\n"
        );
    }

    #[test]
    fn test_format_error() {
        let err = RegistryAccessError::from_win32(2);
        assert_eq!(format_error(&err), "\n*** ERROR: HResult=0x80070002");

        let err = RegistryAccessError::from_win32(error::ERROR_UNSUPPORTED_TYPE);
        assert_eq!(format_error(&err), "\n*** ERROR: HResult=0x8007065E");
    }
}
