use anyhow::Result;

fn main() -> Result<()> {
    railhead::app::run()
}
