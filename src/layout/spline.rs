//! Uniform cubic B-spline ("basis") path generation.
//!
//! The curve starts at the first point and ends at the last point; interior
//! points act as control points, which rounds off the polygon corners.

pub fn basis_path(points: &[(f64, f64)], closed: bool) -> String {
    let mut d = String::new();
    match points {
        [] => return d,
        [only] => {
            d.push_str(&format!("M {:.2} {:.2}", only.0, only.1));
        }
        [first, second] => {
            d.push_str(&format!("M {:.2} {:.2}", first.0, first.1));
            d.push_str(&format!(" L {:.2} {:.2}", second.0, second.1));
        }
        [first, rest @ ..] => {
            d.push_str(&format!("M {:.2} {:.2}", first.0, first.1));
            let mut p0 = *first;
            let mut p1 = rest[0];
            d.push_str(&format!(
                " L {:.2} {:.2}",
                (5.0 * p0.0 + p1.0) / 6.0,
                (5.0 * p0.1 + p1.1) / 6.0
            ));
            for &p in &rest[1..] {
                push_segment(&mut d, p0, p1, p);
                p0 = p1;
                p1 = p;
            }
            push_segment(&mut d, p0, p1, p1);
            d.push_str(&format!(" L {:.2} {:.2}", p1.0, p1.1));
        }
    }
    if closed {
        d.push_str(" Z");
    }
    d
}

fn push_segment(d: &mut String, p0: (f64, f64), p1: (f64, f64), p: (f64, f64)) {
    d.push_str(&format!(
        " C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
        (2.0 * p0.0 + p1.0) / 3.0,
        (2.0 * p0.1 + p1.1) / 3.0,
        (p0.0 + 2.0 * p1.0) / 3.0,
        (p0.1 + 2.0 * p1.1) / 3.0,
        (p0.0 + 4.0 * p1.0 + p.0) / 6.0,
        (p0.1 + 4.0 * p1.1 + p.1) / 6.0
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_short_inputs() {
        assert_eq!(basis_path(&[], true), "");
        assert_eq!(basis_path(&[(1.0, 2.0)], false), "M 1.00 2.00");
        assert_eq!(
            basis_path(&[(0.0, 0.0), (6.0, 0.0)], true),
            "M 0.00 0.00 L 6.00 0.00 Z"
        );
    }

    #[test]
    fn three_points_match_basis_curve() {
        let d = basis_path(&[(0.0, 0.0), (6.0, 6.0), (12.0, 0.0)], false);
        assert_eq!(
            d,
            "M 0.00 0.00 L 1.00 1.00 C 2.00 2.00 4.00 4.00 6.00 4.00 C 8.00 4.00 10.00 2.00 11.00 1.00 L 12.00 0.00"
        );
    }

    #[test]
    fn closes_when_asked() {
        let d = basis_path(&[(0.0, 0.0), (6.0, 6.0), (12.0, 0.0)], true);
        assert!(d.ends_with(" Z"));
        assert_eq!(d.matches(" C ").count(), 2);
    }
}
