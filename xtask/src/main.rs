/// Bundles the plugin via nih_plug_xtask. Usage:
///
///   cargo xtask bundle loveless-lowpass-v1 --release
///
/// The result lands in `target/bundled/` as `Loveless Lowpass.vst3` and
/// `Loveless Lowpass.clap`.
fn main() -> nih_plug_xtask::Result<()> {
    nih_plug_xtask::main()
}
