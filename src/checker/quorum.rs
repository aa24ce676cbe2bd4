use crate::probe::diagnostics::NodeRole;

/// Plain mode: the attempt is ok iff every node reports liveness. NB: an empty response set
///  evaluates to ok - the reduction over zero elements yields its identity. This is a deliberate,
///  documented choice (a transport that returns no per-node entries claims nothing is wrong).
pub fn evaluate_liveness(responses: &[bool]) -> bool {
    responses.iter().all(|imok| *imok)
}

/// Detailed mode: decides whether one attempt's per-node roles describe a collectively healthy
///  ensemble.
///
/// A normal quorum has exactly one leader and every other node accounted for as a follower. A
///  standalone node is valid only as a single-node ensemble, and its presence suppresses the
///  leader/follower consistency check. Any node without a known role fails the attempt, but
///  counting continues so a standalone node later in the list is still evaluated.
pub fn evaluate_roles(roles: &[NodeRole]) -> bool {
    let mut leaders = 0;
    let mut followers = 0;
    let mut ok = true;
    let mut standalone = false;

    for role in roles {
        match role {
            NodeRole::Follower => followers += 1,
            NodeRole::Leader => leaders += 1,
            NodeRole::Unknown => ok = false,
            NodeRole::Standalone => {
                ok = ok && roles.len() == 1;
                standalone = true;
            }
        }
    }

    if !standalone {
        ok = ok && leaders == 1 && leaders + followers == roles.len();
    }
    ok
}
