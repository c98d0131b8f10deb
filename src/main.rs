use std::io::{self, Read, Write};
use std::process;

use log::error;
use prost::Message;

use protoc_gen_flow::{compile_request, Error, Request};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("{}", e);
        eprintln!("protoc-gen-flow: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;

    let request = Request::decode(&buf)?;
    let response = compile_request(&request);

    buf.clear();
    response.encode(&mut buf)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(&buf)?;
    stdout.flush()?;

    Ok(())
}
