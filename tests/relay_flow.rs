//! End-to-end relay tests: an IRC client on one side, a fake chat server on
//! the other, the gateway binary in between.

mod common;

use common::{FakeShowdown, TestServer};

#[tokio::test]
async fn client_commands_reach_the_chat_server() {
    let mut remote = FakeShowdown::start().await.expect("fake remote");
    let server = TestServer::spawn(remote.url()).await.expect("spawn server");
    let mut client = server.connect("red").await.expect("connect");

    client.register("Red").await.expect("register");

    client.send_raw("JOIN #foo,bar").await.unwrap();
    assert_eq!(remote.next_frame().await.unwrap(), "|/join foo");
    assert_eq!(remote.next_frame().await.unwrap(), "|/join bar");

    client.send_raw("PRIVMSG #foo :hi there").await.unwrap();
    assert_eq!(remote.next_frame().await.unwrap(), "foo|hi there");

    client.send_raw("PRIVMSG #foo :\x01ACTION waves\x01").await.unwrap();
    assert_eq!(remote.next_frame().await.unwrap(), "foo|/me waves");

    client.send_raw("PRIVMSG Bob :\x01ACTION waves\x01").await.unwrap();
    assert_eq!(remote.next_frame().await.unwrap(), "|/pm Bob,/me waves");

    client.send_raw("PRIVMSG NickServ :IDENTIFY x").await.unwrap();
    client.send_raw("PART #foo").await.unwrap();
    assert_eq!(remote.next_frame().await.unwrap(), "foo|/part");
}

#[tokio::test]
async fn chat_server_events_reach_the_client() {
    let remote = FakeShowdown::start().await.expect("fake remote");
    let server = TestServer::spawn(remote.url()).await.expect("spawn server");
    let mut client = server.connect("red").await.expect("connect");

    client.register("Red").await.expect("register");

    remote.push(">foo\n|init|chat\n|title|Foo Room\n|users|2, Red,+Bob");
    let join = client.expect_command("JOIN").await.unwrap();
    assert_eq!(join.to_string(), ":Red!red@showdown JOIN #foo");
    let topic = client.expect_command("332").await.unwrap();
    assert_eq!(topic.params, vec!["Red", "#foo", "Foo Room"]);
    let names = client.expect_command("353").await.unwrap();
    assert_eq!(names.arg(3), Some("Red +Bob"));
    client.expect_command("366").await.unwrap();

    remote.push(">foo\n|c|+Bob|hello | world\n|c| Red|my own echo");
    let msg = client.expect_command("PRIVMSG").await.unwrap();
    assert_eq!(msg.to_string(), ":Bob!bob@showdown PRIVMSG #foo :hello | world");

    remote.push("|pm|+Bob| Red|psst");
    let pm = client.expect_command("PRIVMSG").await.unwrap();
    assert_eq!(pm.to_string(), ":Bob!bob@showdown PRIVMSG Red psst");
}

#[tokio::test]
async fn remote_hang_up_closes_the_client() {
    let mut remote = FakeShowdown::start().await.expect("fake remote");
    let server = TestServer::spawn(remote.url()).await.expect("spawn server");
    let mut client = server.connect("red").await.expect("connect");

    client.register("Red").await.expect("register");
    client.send_raw("JOIN #foo").await.unwrap();
    remote.next_frame().await.unwrap();

    remote.hang_up();
    let error = client.expect_command("ERROR").await.unwrap();
    assert!(error.arg(0).unwrap().starts_with("Closing Link"));
    client.expect_closed().await.unwrap();
}

#[tokio::test]
async fn remote_rename_is_used_for_later_replies() {
    let remote = FakeShowdown::start().await.expect("fake remote");
    let server = TestServer::spawn(remote.url()).await.expect("spawn server");
    let mut client = server.connect("red").await.expect("connect");

    client.register("Red").await.expect("register");

    remote.push("|updateuser| Red Two|1|1");
    let nick = client.expect_command("NICK").await.unwrap();
    assert_eq!(nick.to_string(), ":Red!red@showdown NICK Red\u{a0}Two");

    client.send_raw("MODE #lobby").await.unwrap();
    let modes = client.expect_command("324").await.unwrap();
    assert_eq!(modes.arg(0), Some("Red\u{a0}Two"));
}

#[tokio::test]
async fn room_names_with_a_pipe_never_reach_the_chat_server() {
    let mut remote = FakeShowdown::start().await.expect("fake remote");
    let server = TestServer::spawn(remote.url()).await.expect("spawn server");
    let mut client = server.connect("red").await.expect("connect");

    client.register("Red").await.expect("register");

    client.send_raw("PRIVMSG #a|/kick :hi").await.unwrap();
    let reply = client.expect_command("403").await.unwrap();
    assert_eq!(reply.arg(1), Some("#a|/kick"));

    client.send_raw("JOIN #a|/kick,#ok").await.unwrap();
    client.expect_command("403").await.unwrap();
    assert_eq!(remote.next_frame().await.unwrap(), "|/join ok");
}
