use cmdalias::{dispatch, invoked_name, Config};
use std::env::args;
use std::process::exit;

fn main() {
    let args: Vec<String> = args().collect();
    let name = invoked_name(&args[0]);

    let config = match Config::from_env() {
        Some(config) => config,
        None => {
            println!("No GoAliasesFile environment variable set");
            return;
        }
    };

    match dispatch(&config, name, &args[1..]) {
        Ok(code) => exit(code),
        Err(e) => {
            println!("{}", e);
            exit(1);
        }
    }
}
