use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Notebook parameter list literal, e.g. "['customer']"
    pub params: String,
}
