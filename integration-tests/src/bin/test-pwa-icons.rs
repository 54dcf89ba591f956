fn main() -> eyre::Result<()> {
    pwa_icons::main()
}
