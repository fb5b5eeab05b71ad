mod app;
mod cli;

fn main() {
    app::run(cli::parse());
}
