use crate::models::StayListing;
use std::fmt::Write;

/// One `"<start> to <end>: <price> > Info: <beds> - "` entry per listing.
/// The trailing ` - ` doubles as the separator; there is no terminator.
pub fn build_prompt<L: StayListing>(listings: &[L]) -> String {
    let mut prompt = String::new();
    for listing in listings {
        // writing into a String cannot fail
        let _ = write!(
            prompt,
            "{} to {}: {:.2} > Info: {} - ",
            listing.start_date(),
            listing.end_date(),
            listing.price(),
            listing.bed_configuration()
        );
    }
    prompt
}
