//! Integration tests for the line-delimited JSON tool server

#![allow(deprecated)]

use serde_json::{json, Value};

mod common;
use common::Workspace;

fn serve(ws: &Workspace, requests: &[Value]) -> Vec<Value> {
    let mut input = String::new();
    for request in requests {
        input.push_str(&request.to_string());
        input.push('\n');
    }

    let output = ws.cmd().arg("serve").write_stdin(input).output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_list_tools() {
    let ws = Workspace::new();
    ws.write_config("");

    let responses = serve(&ws, &[json!({"id": 1, "tool": "list_tools"})]);
    assert_eq!(responses.len(), 1);
    let names: Vec<&str> = responses[0]["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|tool| tool["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        ["list_tools", "list_todos", "add_todo", "mark_done", "get_agenda", "list_tags"]
    );
}

#[test]
fn test_add_list_and_complete() {
    let ws = Workspace::new();
    ws.write_config("");
    let inbox = ws.write_org("inbox.org", "* Inbox\n");

    let responses = serve(
        &ws,
        &[
            json!({"id": 1, "tool": "add_todo", "arguments": {
                "title": "Pay rent",
                "file": inbox.to_string_lossy(),
                "priority": "A",
                "tags": "home",
                "deadline": "2026-01-31"
            }}),
            json!({"id": 2, "tool": "list_todos", "arguments": {"tag": "home"}}),
            json!({"id": 3, "tool": "mark_done", "arguments": {
                "id": format!("{}:2", inbox.display())
            }}),
            json!({"id": 4, "tool": "list_todos", "arguments": {"status": "DONE"}}),
        ],
    );

    assert_eq!(responses.len(), 4);
    assert!(responses.iter().all(|r| r["ok"] == json!(true)), "{:?}", responses);
    assert_eq!(responses[1]["result"][0]["title"], "Pay rent");
    assert_eq!(responses[1]["result"][0]["priority"], "A");
    assert_eq!(responses[3]["id"], 4);
    assert_eq!(responses[3]["result"][0]["title"], "Pay rent");

    assert_eq!(
        ws.read_org("inbox.org"),
        "* Inbox\n* DONE [#A] Pay rent :home:\nDEADLINE: <2026-01-31 Sat>\n"
    );
}

#[test]
fn test_agenda_and_tags() {
    let ws = Workspace::new();
    ws.write_config("");
    ws.write_org(
        "plan.org",
        "* TODO Standup :work:\nSCHEDULED: <2026-01-05 Mon>\n* TODO Review :work:review:\nDEADLINE: <2026-01-07 Wed>\n",
    );

    let responses = serve(
        &ws,
        &[
            json!({"id": "a", "tool": "get_agenda", "arguments": {"date": "2026-01-05", "range": "week"}}),
            json!({"id": "t", "tool": "list_tags", "arguments": null}),
        ],
    );

    let agenda = &responses[0]["result"];
    assert_eq!(agenda["start"], "2026-01-04");
    assert_eq!(agenda["end"], "2026-01-10");
    assert_eq!(agenda["items"].as_array().unwrap().len(), 2);
    assert_eq!(agenda["items"][1]["reason"], "deadline");
    assert_eq!(responses[1]["result"], json!(["review", "work"]));
}

#[test]
fn test_errors_do_not_stop_the_server() {
    let ws = Workspace::new();
    ws.write_config("");
    ws.write_org("inbox.org", "* Note\n");

    let output = ws
        .cmd()
        .arg("serve")
        .write_stdin(
            "garbage\n\n{\"id\":1,\"tool\":\"mark_done\",\"arguments\":{\"id\":\"nowhere\"}}\n{\"id\":2,\"tool\":\"list_tags\"}\n",
        )
        .output()
        .unwrap();
    assert!(output.status.success());

    let responses: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["ok"], false);
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[1]["ok"], false);
    assert!(responses[1]["error"]
        .as_str()
        .unwrap()
        .contains("Invalid location"));
    assert_eq!(responses[2]["ok"], true);
}
