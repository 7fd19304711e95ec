use std::sync::Arc;

use hashport::{channel, hash_str, reverse, MessagePort};

#[tokio::main]
async fn main() {
    let h = hash_str("main:/player#script");
    println!("hash:     {h:#018x}");
    println!("reverse:  {}", reverse(h));
    println!("unknown:  {}", reverse(0xdead_beef_dead_beef));

    let (dispatch, mut rx) = channel();
    let port = MessagePort::new(Arc::new(dispatch));
    port.send("main:/hud#gui", "update_score", b"{\"score\":128}");

    if let Some(env) = rx.recv().await {
        println!("dispatched {} -> {} ({} bytes)", env.name, env.receiver, env.payload.len());
    }
}
