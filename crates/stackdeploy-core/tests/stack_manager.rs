mod support;

use stackdeploy_core::error::StackError;
use stackdeploy_core::manager::StackManager;
use stackdeploy_core::platform::Platform;
use stackdeploy_core::runner::RunOutput;
use stackdeploy_core::types::{EndpointDescriptor, StackDescriptor, TlsConfig};

use support::{RecordingRunner, UnlaunchableRunner};

fn blog() -> StackDescriptor {
    StackDescriptor::new("blog", "/data/stacks/blog")
}

fn verified_endpoint() -> EndpointDescriptor {
    EndpointDescriptor::new("tcp://10.0.0.5:2376").with_tls(TlsConfig::verified("/certs/ca.pem"))
}

#[test]
fn deploy_runs_full_command_line() {
    let runner = RecordingRunner::ok();
    let manager = StackManager::with_runner(Platform::Unix, &runner);

    manager.deploy(&blog(), &verified_endpoint()).unwrap();

    let call = runner.only_call();
    let manifest = blog().manifest_path();
    assert_eq!(call.program, "docker");
    assert_eq!(
        call.to_string(),
        format!(
            "docker -H tcp://10.0.0.5:2376 --tls --tlsverify --tlscacert /certs/ca.pem \
             stack deploy --compose-file {} blog",
            manifest.display()
        )
    );
    assert_eq!(call.args[call.args.len() - 2], manifest.into_os_string());
}

#[test]
fn remove_ends_with_stack_rm() {
    let runner = RecordingRunner::ok();
    let manager = StackManager::with_runner(Platform::Unix, &runner);

    manager.remove(&blog(), &verified_endpoint()).unwrap();

    let args = runner.only_call().args_lossy();
    assert_eq!(args[args.len() - 3..], ["stack", "rm", "blog"]);
    assert!(!args.iter().any(|a| a == "--compose-file"));
}

#[test]
fn windows_platform_targets_exe() {
    let runner = RecordingRunner::ok();
    let manager = StackManager::with_runner(Platform::Windows, &runner);

    manager
        .remove(&blog(), &EndpointDescriptor::new("tcp://10.0.0.5:2375"))
        .unwrap();

    assert_eq!(runner.only_call().program, "docker.exe");
}

#[test]
fn custom_tool_gets_platform_suffix() {
    let runner = RecordingRunner::ok();
    let manager = StackManager::with_runner(Platform::Windows, &runner).with_tool("/docker");

    manager
        .deploy(&blog(), &EndpointDescriptor::new("tcp://10.0.0.5:2375"))
        .unwrap();

    assert_eq!(runner.only_call().program, "/docker.exe");
}

#[test]
fn success_ignores_diagnostics() {
    let runner = RecordingRunner::replying(RunOutput {
        success: true,
        code: Some(0),
        diagnostics: "Creating network blog_default\n".to_string(),
    });
    let manager = StackManager::with_runner(Platform::Unix, &runner);

    assert!(manager.deploy(&blog(), &verified_endpoint()).is_ok());
}

#[test]
fn failure_carries_diagnostics_verbatim() {
    let diagnostics = "open /data/stacks/blog/docker-compose.yml: no such file or directory\n";
    let runner = RecordingRunner::replying(RunOutput::failed(1, diagnostics));
    let manager = StackManager::with_runner(Platform::Unix, &runner);

    let err = manager.deploy(&blog(), &verified_endpoint()).unwrap_err();

    assert_eq!(err.to_string(), diagnostics);
    assert_eq!(err.detail(), Some(diagnostics));
    assert_eq!(err.exit_code(), Some(1));
}

#[test]
fn failure_with_no_diagnostics_has_empty_message() {
    let runner = RecordingRunner::replying(RunOutput::failed(2, ""));
    let manager = StackManager::with_runner(Platform::Unix, &runner);

    let err = manager.remove(&blog(), &verified_endpoint()).unwrap_err();

    assert!(matches!(err, StackError::Operation { .. }));
    assert_eq!(err.to_string(), "");
}

#[test]
fn launch_failure_is_returned() {
    let manager = StackManager::with_runner(Platform::Unix, UnlaunchableRunner);

    let err = manager.deploy(&blog(), &verified_endpoint()).unwrap_err();

    assert!(matches!(err, StackError::Launch { ref program, .. } if program == "docker"));
}

#[test]
fn empty_stack_name_is_rejected_without_spawning() {
    let runner = RecordingRunner::ok();
    let manager = StackManager::with_runner(Platform::Unix, &runner);
    let stack = StackDescriptor::new("", "/data/stacks/blog");

    let err = manager.deploy(&stack, &verified_endpoint()).unwrap_err();

    assert!(matches!(err, StackError::InvalidStack(_)));
    assert!(runner.calls().is_empty());
}

#[test]
fn dry_run_commands_match_executed_ones() {
    let runner = RecordingRunner::ok();
    let manager = StackManager::with_runner(Platform::Unix, &runner);
    let endpoint = verified_endpoint();

    manager.deploy(&blog(), &endpoint).unwrap();
    manager.remove(&blog(), &endpoint).unwrap();

    assert_eq!(
        runner.calls(),
        vec![
            manager.deploy_command(&blog(), &endpoint),
            manager.remove_command(&blog(), &endpoint)
        ]
    );
}
