//! Registration completion: open the remote session and greet the client.

use super::super::Context;
use crate::error::{HandlerError, HandlerResult};
use crate::escape::escape_user_with_host;
use irc_proto::{Message, Prefix, Response};
use tracing::{info, warn};

/// Finish registration once NICK and USER have both arrived.
///
/// Opens the remote session with the collected credentials. On failure the
/// client gets `ERROR` and the connection is closed.
pub(crate) async fn continue_connection(ctx: &mut Context<'_>) -> HandlerResult {
    let credentials = ctx.session.login.credentials();
    match ctx.connector.connect(credentials) {
        Ok(connected) => ctx.session.attach(connected),
        Err(e) => {
            warn!(error = %e, "Could not open remote session");
            ctx.send(Message::error(&format!("Closing Link: {e}"))).await?;
            ctx.session.close();
            return Err(HandlerError::Remote(e.to_string()));
        }
    }

    send_nick_change(ctx).await?;
    send_welcome_burst(ctx).await?;
    send_motd(ctx).await?;

    info!(nick = %ctx.session.nickname, "Client registered");
    Ok(())
}

/// Tell the client its nick is the escaped remote name, not the one it asked
/// for.
async fn send_nick_change(ctx: &Context<'_>) -> HandlerResult {
    let Some(requested) = ctx.session.requested_nick.as_deref() else {
        return Ok(());
    };
    let nickname = ctx.session.nickname.get();
    if requested == nickname || nickname.is_empty() {
        return Ok(());
    }
    let msg = Message::new("NICK", [nickname]).with_prefix(Prefix::new_from_str(requested));
    ctx.send(msg).await
}

async fn send_welcome_burst(ctx: &Context<'_>) -> HandlerResult {
    let server = ctx.server;
    let mask = escape_user_with_host(&ctx.session.login.nickname);

    ctx.send_reply(
        Response::RPL_WELCOME,
        vec![format!(
            "Welcome to the {} IRC Network {}",
            server.network, mask
        )],
    )
    .await?;
    ctx.send_reply(
        Response::RPL_YOURHOST,
        vec![format!(
            "Your host is {}, running version {}",
            server.name, server.version
        )],
    )
    .await?;
    ctx.send_reply(
        Response::RPL_CREATED,
        vec![format!("This server was created {}", server.created)],
    )
    .await?;
    ctx.send_reply(
        Response::RPL_MYINFO,
        vec![
            server.name.clone(),
            server.version.clone(),
            "i".to_string(),
            "ntc".to_string(),
        ],
    )
    .await
}

async fn send_motd(ctx: &Context<'_>) -> HandlerResult {
    let server = ctx.server;
    if server.motd.is_empty() {
        return ctx
            .send_reply(Response::ERR_NOMOTD, vec!["MOTD File is missing".to_string()])
            .await;
    }

    ctx.send_reply(
        Response::RPL_MOTDSTART,
        vec![format!("- {} Message of the day - ", server.name)],
    )
    .await?;
    for line in &server.motd {
        ctx.send_reply(Response::RPL_MOTD, vec![format!("- {line}")])
            .await?;
    }
    ctx.send_reply(
        Response::RPL_ENDOFMOTD,
        vec!["End of /MOTD command.".to_string()],
    )
    .await
}
