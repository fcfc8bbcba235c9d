fn main() -> anyhow::Result<()> {
    ui::main()
}
