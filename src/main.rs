fn main() -> anyhow::Result<()> {
    fan_flow::flow::run()
}
