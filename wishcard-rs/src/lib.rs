//! Share-card generation for the new-year wish wall.
//!
//! The pipeline turns a wish into a downloadable PNG card:
//! 1. resolve the share URL from the wall's redirect endpoint
//!    (falling back to a default on any network failure),
//! 2. encode that URL as a QR symbol,
//! 3. composite the card layers onto a 750x1100 canvas, and
//! 4. encode the result as a PNG.
//!
//! # Example
//!
//! ```rust,ignore
//! use wishcard_rs::{CardRenderer, RedirectResolver, Wish};
//!
//! let wish = Wish::new("新年快乐", "小白");
//! let resolver = RedirectResolver::default();
//! let renderer = CardRenderer::new();
//! let card = wishcard_rs::share(&renderer, &resolver, &wish).await?;
//! std::fs::write("card.png", card.png_bytes())?;
//! ```

pub mod card;
pub mod error;
pub mod export;
pub mod layout;
pub mod qr;
pub mod redirect;
pub mod session;
pub mod wish;

pub use card::{CardImage, CardRenderer, CARD_HEIGHT, CARD_WIDTH};
pub use error::{CardError, CardResult};
pub use redirect::{RedirectResolver, DEFAULT_REDIRECT_URL};
pub use session::{ShareSession, ShareState};
pub use wish::Wish;

/// The whole share flow: resolve the redirect URL, then render the card.
///
/// Network failure is absorbed by the resolver; only render failures
/// surface as errors.
pub async fn share(
    renderer: &CardRenderer,
    resolver: &RedirectResolver,
    wish: &Wish,
) -> CardResult<CardImage> {
    let url = resolver.resolve_or_default().await;
    renderer.generate(wish, &url).await
}
