//! IRC numeric replies.
//!
//! Only the numerics the gateway actually emits are listed. Each variant's
//! discriminant is its wire code, so `code()` is a cast and `Display` pads
//! to the three digits the protocol requires.
//!
//! # Reference
//! - RFC 2812: Internet Relay Chat: Client Protocol
//! - Modern IRC documentation: <https://modern.ircdocs.horse/>

#![allow(non_camel_case_types)]

use crate::message::Message;
use std::fmt;

/// IRC server response code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum Response {
    /// 001 - Welcome to the network
    RPL_WELCOME = 1,
    /// 002 - Your host is running version
    RPL_YOURHOST = 2,
    /// 003 - Server creation date
    RPL_CREATED = 3,
    /// 004 - Server name, version, user modes, channel modes
    RPL_MYINFO = 4,
    /// 302 - Reply to USERHOST
    RPL_USERHOST = 302,
    /// 324 - Channel modes
    RPL_CHANNELMODEIS = 324,
    /// 332 - Channel topic
    RPL_TOPIC = 332,
    /// 353 - Names list entry
    RPL_NAMREPLY = 353,
    /// 366 - End of names list
    RPL_ENDOFNAMES = 366,
    /// 372 - MOTD line
    RPL_MOTD = 372,
    /// 375 - Start of MOTD
    RPL_MOTDSTART = 375,
    /// 376 - End of MOTD
    RPL_ENDOFMOTD = 376,
    /// 403 - No such channel
    ERR_NOSUCHCHANNEL = 403,
    /// 417 - Input line too long
    ERR_INPUTTOOLONG = 417,
    /// 422 - MOTD file is missing
    ERR_NOMOTD = 422,
    /// 451 - You have not registered
    ERR_NOTREGISTERED = 451,
    /// 461 - Not enough parameters
    ERR_NEEDMOREPARAMS = 461,
    /// 462 - You may not reregister
    ERR_ALREADYREGISTRED = 462,
    /// 491 - No O-lines for your host
    ERR_NOOPERHOST = 491,
}

impl Response {
    /// The numeric code.
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }

    fn error_msg(self, params: Vec<String>) -> Message {
        Message::response(self, params)
    }

    /// `461 ERR_NEEDMOREPARAMS`: `<client> <command> :Not enough parameters`
    pub fn err_needmoreparams(client: &str, command: &str) -> Message {
        Response::ERR_NEEDMOREPARAMS.error_msg(vec![
            client.to_string(),
            command.to_string(),
            "Not enough parameters".to_string(),
        ])
    }

    /// `462 ERR_ALREADYREGISTRED`: `<client> :You may not reregister`
    pub fn err_alreadyregistred(client: &str) -> Message {
        Response::ERR_ALREADYREGISTRED
            .error_msg(vec![client.to_string(), "You may not reregister".to_string()])
    }

    /// `451 ERR_NOTREGISTERED`: `<client> :You have not registered`
    pub fn err_notregistered(client: &str) -> Message {
        Response::ERR_NOTREGISTERED
            .error_msg(vec![client.to_string(), "You have not registered".to_string()])
    }

    /// `491 ERR_NOOPERHOST`: `<client> :No O-lines for your host`
    pub fn err_nooperhost(client: &str) -> Message {
        Response::ERR_NOOPERHOST
            .error_msg(vec![client.to_string(), "No O-lines for your host".to_string()])
    }

    /// `403 ERR_NOSUCHCHANNEL`: `<client> <channel> :No such channel`
    pub fn err_nosuchchannel(client: &str, channel: &str) -> Message {
        Response::ERR_NOSUCHCHANNEL.error_msg(vec![
            client.to_string(),
            channel.to_string(),
            "No such channel".to_string(),
        ])
    }

    /// `417 ERR_INPUTTOOLONG`: `<client> :Input line too long`
    pub fn err_inputtoolong(client: &str) -> Message {
        Response::ERR_INPUTTOOLONG
            .error_msg(vec![client.to_string(), "Input line too long".to_string()])
    }

    /// `302 RPL_USERHOST`: `<client> :<entry>`
    pub fn rpl_userhost(client: &str, entry: &str) -> Message {
        Message::response(
            Response::RPL_USERHOST,
            vec![client.to_string(), entry.to_string()],
        )
    }

    /// `324 RPL_CHANNELMODEIS`: `<client> <channel> <modes> :`
    ///
    /// The empty trailing argument matches what most servers send when a
    /// channel has no mode parameters.
    pub fn rpl_channelmodeis(client: &str, channel: &str, modes: &str) -> Message {
        Message::response(
            Response::RPL_CHANNELMODEIS,
            vec![
                client.to_string(),
                channel.to_string(),
                modes.to_string(),
                String::new(),
            ],
        )
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.code())
    }
}
