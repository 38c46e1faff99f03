fn main() {
    // The webview shell is optional; the core library builds without Tauri.
    #[cfg(feature = "desktop")]
    tauri_build::build();
}
