use decidr::cli::{describe, run};
use decidr::error::Error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("DECIDR_LOG", "warn")).init();

    #[cfg(windows)]
    let _ = enable_ansi_support::enable_ansi_support();

    if let Err(e) = run() {
        match e.downcast_ref::<Error>() {
            Some(err) if err.is_user_error() => {
                eprintln!("Error: {}", describe(err));
                std::process::exit(1);
            }
            _ => {
                eprintln!("Internal error: {}", e);
                let mut causes = e.chain().skip(1).peekable();
                if causes.peek().is_some() {
                    eprintln!("\nCaused by:");
                    for (indent, cause) in causes.enumerate() {
                        eprintln!("{:indent$}  {}", "", cause, indent = indent + 1);
                    }
                }
                std::process::exit(2);
            }
        }
    }
}
