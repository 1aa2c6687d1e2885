#[cfg(target_arch = "wasm32")]
fn main() {
    // Listeners and the controller stay alive through the closures handed
    // to the page, the handle itself is not needed here.
    let _form = register_form::browser::start();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("register-frontend runs in the browser, build it for wasm32-unknown-unknown");
}
