use std::sync::OnceLock;

use rust_embed::RustEmbed;
use tracing::warn;

/// Embed the `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();

/// Returns the contents of `assets/main.css`.
pub fn main_css() -> &'static str {
    MAIN_CSS.get_or_init(|| load_text("main.css")).as_str()
}

/// Missing or non-UTF-8 assets render unstyled rather than aborting startup.
fn load_text(name: &str) -> String {
    let Some(file) = EmbeddedAssets::get(name) else {
        warn!(asset = name, "embedded asset not found");
        return String::new();
    };
    String::from_utf8(file.data.into_owned()).unwrap_or_else(|_| {
        warn!(asset = name, "embedded asset is not valid UTF-8");
        String::new()
    })
}
