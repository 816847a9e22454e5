use kable::{Ansible, Inventory, Playbook, Task, builtin};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化tracing日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    let target = std::env::args().nth(1).unwrap_or_else(|| "localhost".to_string());

    println!("=== kable demo ===\n");

    let playbook = Playbook::new("My first play")
        .with_hosts("myhosts")
        .add_task(Task::new("Ping my hosts").add_module(builtin::ping()))
        .add_task(Task::new("Print message").add_module(builtin::debug("Hello world")));

    println!("Playbook YAML:\n{}", playbook.to_yaml()?);

    // ad-hoc ping
    let mut ping = Ansible::builder()
        .inventory(Inventory::new("myhosts").add_shorthand(&target))
        .host_pattern("myhosts")
        .module("ping")
        .build();
    let result = ping.execute().await?;
    println!("ping exit code: {}", result.exit_code);
    println!("{}", result.combined_output());

    // playbook
    let mut play = Ansible::builder()
        .inventory(Inventory::new("myhosts").add_shorthand(&target))
        .playbook(playbook)
        .build();
    let result = play.execute().await?;
    println!("playbook success: {}", result.is_success());
    println!("{}", result.combined_output());

    Ok(())
}
