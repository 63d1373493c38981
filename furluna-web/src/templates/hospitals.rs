//! Hospital listing cards
//!
//! Renders search results into the fragment that fills the appointment
//! page's listing region. Rendering is pure: same places, same markup.

use furluna_core::storage::END_MARKER;
use furluna_search::{PhotoUrlBuilder, PlaceResult};

use super::escape_html;

/// Shown in the listing region when the hospital search failed.
pub const SEARCH_ERROR_NOTICE: &str = "<p>Error fetching nearby hospitals</p>";

/// Filler copy; the places API gives no description to show here.
const PLACEHOLDER_DESCRIPTION: &str = "Phasellus convallis elit id ullamcorper pulvinar. \
     Duis aliquam turpis mauris, eu ultricies erat malesuada quis. Aliquam dapibus.";

const LEARN_MORE_HREF: &str = "generic.html";

/// Renders one hospital card.
///
/// The image source is the photo URL when the place has a photo reference
/// and the empty string otherwise.
pub fn render_card(place: &PlaceResult, photos: &PhotoUrlBuilder) -> String {
    let src = escape_html(&photos.src_for(place.photo_reference.as_deref()));
    let name = escape_html(&place.name);

    format!(
        r##"<section>
    <a href="#one" class="image"><img src="{src}" alt="" data-position="top center" /></a>
    <div class="content">
        <div class="inner">
            <h2>{name}</h2>
            <p>{PLACEHOLDER_DESCRIPTION}</p>
            <ul class="actions">
                <li><a href="{LEARN_MORE_HREF}" class="button">Learn more</a></li>
            </ul>
        </div>
    </div>
</section>"##
    )
}

/// Renders all cards in input order, terminated by the end marker.
pub fn render_hospitals(places: &[PlaceResult], photos: &PhotoUrlBuilder) -> String {
    let mut fragment: String = places
        .iter()
        .map(|place| render_card(place, photos))
        .collect();
    fragment.push_str(END_MARKER);
    fragment
}

/// Renders the search-failure notice, terminated by the end marker.
pub fn render_search_error() -> String {
    format!("{SEARCH_ERROR_NOTICE}{END_MARKER}")
}
