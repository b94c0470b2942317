//! Node-wise formulas for derived material quantities.

use ndarray::{Array3, Zip};
use sem_common::Derived;

use crate::error::{FieldError, FieldResult};

/// Evaluate a derived quantity from its primitive cubes.
///
/// `inputs` must follow the order of [`Derived::inputs`] and all cubes must
/// share one shape.
pub fn evaluate(kind: Derived, inputs: &[Array3<f32>]) -> FieldResult<Array3<f32>> {
    let names = kind.inputs();
    if inputs.len() != names.len() {
        return Err(FieldError::format(format!(
            "{} needs {} input cubes, got {}",
            kind.name(),
            names.len(),
            inputs.len()
        )));
    }

    let shape = inputs[0].shape();
    for (cube, primitive) in inputs.iter().zip(names).skip(1) {
        if cube.shape() != shape {
            return Err(FieldError::format(format!(
                "{} cube has shape {:?}, expected {:?} for {}",
                primitive.name(),
                cube.shape(),
                shape,
                kind.name()
            )));
        }
    }

    let out = match kind {
        Derived::Rho => inputs[0].mapv(|rhoinv| 1.0 / rhoinv),
        Derived::Vp => Zip::from(&inputs[0])
            .and(&inputs[1])
            .and(&inputs[2])
            .map_collect(|&lambda, &mu, &rhoinv| ((lambda + 2.0 * mu) * rhoinv).sqrt()),
        Derived::Vsh => Zip::from(&inputs[0])
            .and(&inputs[1])
            .map_collect(|&mu, &rhoinv| (mu * rhoinv).sqrt()),
        Derived::Vsv => Zip::from(&inputs[0])
            .and(&inputs[1])
            .and(&inputs[2])
            .map_collect(|&mu, &rhoinv, &b| ((mu + b) * rhoinv).sqrt()),
    };

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(value: f32) -> Array3<f32> {
        Array3::from_elem((3, 3, 6), value)
    }

    #[test]
    fn test_rho() {
        let out = evaluate(Derived::Rho, &[cube(0.25)]).unwrap();
        assert!(out.iter().all(|&v| (v - 4.0).abs() < 1e-6));
    }

    #[test]
    fn test_vp() {
        let (l, m, r) = (3.0e10_f32, 2.5e10_f32, 1.0 / 3000.0_f32);
        let out = evaluate(Derived::Vp, &[cube(l), cube(m), cube(r)]).unwrap();
        let expected = ((l + 2.0 * m) * r).sqrt();
        assert!(out.iter().all(|&v| ((v - expected) / expected).abs() < 1e-6));
    }

    #[test]
    fn test_vsh_and_vsv() {
        let (m, r, b) = (2.0e10_f32, 1.0 / 3200.0_f32, 1.0e9_f32);
        let vsh = evaluate(Derived::Vsh, &[cube(m), cube(r)]).unwrap();
        let vsv = evaluate(Derived::Vsv, &[cube(m), cube(r), cube(b)]).unwrap();
        let expected_h = (m * r).sqrt();
        let expected_v = ((m + b) * r).sqrt();
        assert!(vsh.iter().all(|&v| ((v - expected_h) / expected_h).abs() < 1e-6));
        assert!(vsv.iter().all(|&v| ((v - expected_v) / expected_v).abs() < 1e-6));
    }

    #[test]
    fn test_shape_mismatch() {
        let odd = Array3::from_elem((3, 3, 3), 1.0);
        assert!(matches!(
            evaluate(Derived::Vsh, &[cube(1.0), odd]),
            Err(FieldError::Format(msg)) if msg.contains("rhoinv")
        ));
    }

    #[test]
    fn test_wrong_input_count() {
        assert!(matches!(
            evaluate(Derived::Vp, &[cube(1.0)]),
            Err(FieldError::Format(_))
        ));
    }
}
