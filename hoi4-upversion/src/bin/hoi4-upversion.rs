use anyhow::Result;
use hoi4_upversion::GAME_CONSTS;
use upversion_bin_shared::upversion;

fn main() -> Result<()> {
    upversion(GAME_CONSTS, env!("CARGO_PKG_VERSION"), env!("CARGO_PKG_NAME"))
}
