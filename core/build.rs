use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const ICON_SIZE: u32 = 24;

fn main() {
    let icon_dir = Path::new("icons");
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let out_path = out_dir.join("icons.rs");

    let icons = [
        ("GEAR", icon_dir.join("gear.svg")),
        ("NETWORK", icon_dir.join("network.svg")),
        ("TERMINAL", icon_dir.join("terminal.svg")),
        ("INFO", icon_dir.join("info.svg")),
        ("BATTERY", icon_dir.join("battery.svg")),
    ];

    for (_, path) in &icons {
        println!("cargo:rerun-if-changed={}", path.display());
    }

    let mut output = String::new();
    output.push_str(&format!("pub const ICON_SIZE: u32 = {};\n", ICON_SIZE));

    for (name, path) in icons {
        let mask = render_svg_mask(&path, ICON_SIZE, ICON_SIZE);
        output.push_str(&format!("pub const ICON_{}_MASK: &[u8] = &[\n", name));
        for chunk in mask.chunks(16) {
            output.push_str("    ");
            for byte in chunk {
                output.push_str(&format!("0x{:02X}, ", byte));
            }
            output.push('\n');
        }
        output.push_str("];\n\n");
    }

    fs::write(&out_path, output).unwrap();

    println!("cargo:rustc-env=MINISCREEN_VERSION={}", git_tag());
    println!("cargo:rustc-env=MINISCREEN_BUILD_TIME={}", build_time());
}

fn git_tag() -> String {
    if let Ok(tag) = env::var("MINISCREEN_VERSION") {
        if !tag.trim().is_empty() {
            return tag;
        }
    }
    let output = Command::new("git")
        .args(["describe", "--tags", "--dirty", "--always"])
        .output();
    match output {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).trim().to_string(),
        _ => env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "unknown".to_string()),
    }
}

fn build_time() -> String {
    use time::OffsetDateTime;
    use time::format_description::parse;

    let format = parse("[year]-[month]-[day] [hour]:[minute]").unwrap();
    OffsetDateTime::now_utc()
        .format(&format)
        .unwrap_or_else(|_| "unknown".to_string())
}

// Lit pixels are wherever the SVG paints anything; the screen draws them white.
fn render_svg_mask(path: &Path, width: u32, height: u32) -> Vec<u8> {
    let data = fs::read(path).unwrap();
    let options = usvg::Options::default();
    let fontdb = usvg::fontdb::Database::new();
    let tree = usvg::Tree::from_data(&data, &options, &fontdb).unwrap();
    let mut pixmap = tiny_skia::Pixmap::new(width, height).unwrap();
    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap_mut);

    let mut mask = vec![0u8; ((width * height) as usize).div_ceil(8)];
    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            let byte = idx / 8;
            let bit = 7 - (idx % 8);
            let px = pixmap.pixel(x, y).unwrap();
            if px.alpha() > 127 {
                mask[byte] |= 1 << bit;
            }
        }
    }
    mask
}
