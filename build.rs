use cfg_aliases::cfg_aliases;

fn main() {
    // Setup cfg aliases
    cfg_aliases! {
        // Platforms
        windows_platform: { target_os = "windows" },

        // Features
        serde: { feature = "serde" },
    }
}
