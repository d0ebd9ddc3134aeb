//! Default value functions for configuration.

pub fn default_network() -> String {
    "Showdown".to_string()
}

pub fn default_server_url() -> String {
    "wss://sim3.psim.us/showdown/websocket".to_string()
}

pub fn default_login_url() -> String {
    "https://play.pokemonshowdown.com/action.php".to_string()
}

pub fn default_registration_timeout() -> u64 {
    60
}

pub fn default_outbound_queue() -> usize {
    512
}
