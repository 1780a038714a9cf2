// Build script for embedding Windows resources (version info)
// This only runs on Windows targets

fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "windows" {
        #[cfg(windows)]
        embed_windows_resources();
    }
}

#[cfg(windows)]
fn embed_windows_resources() {
    // Package info is set by Cargo during build
    let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());
    let name = std::env::var("CARGO_PKG_NAME").unwrap_or_else(|_| "dicetray".to_string());
    let description =
        std::env::var("CARGO_PKG_DESCRIPTION").unwrap_or_else(|_| "Dice Tray".to_string());

    // Windows VERSIONINFO wants major.minor.patch.0
    let mut parts = version.split('.');
    let major = parts.next().unwrap_or("0");
    let minor = parts.next().unwrap_or("0");
    let patch = parts.next().unwrap_or("0");

    let mut res = winresource::WindowsResource::new();
    res.set("FileVersion", &format!("{}.{}.{}.0", major, minor, patch));
    res.set("ProductVersion", &version);
    res.set("ProductName", "Dice Tray");
    res.set("FileDescription", &description);
    res.set("OriginalFilename", &format!("{}.exe", name));

    match res.compile() {
        Ok(_) => println!("cargo:warning=Compiled Windows version resources"),
        Err(e) => println!("cargo:warning=Failed to compile Windows resources: {}", e),
    }
}
