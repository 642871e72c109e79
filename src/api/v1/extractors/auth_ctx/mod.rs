/*!
 * Authenticated identity extractor
 *
 * Responsibility:
 * - Hand the gate-verified Identity to handlers
 * - Verification itself lives in middleware/services
 */

mod core;

pub use self::core::CurrentIdentity;
