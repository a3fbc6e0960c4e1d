fn main() -> anyhow::Result<()> {
    payroll_dash::cli::run()
}
