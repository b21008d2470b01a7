use nalgebra::{Matrix3, Point3, SymmetricEigen, Vector3};

const MASS_EPSILON: f64 = 1e-9;

pub fn center_of_mass(mass_points: &[(f64, Point3<f64>)]) -> Option<Point3<f64>> {
    let mut total_mass = 0.0;
    let mut weighted_sum = Vector3::zeros();

    for (mass, position) in mass_points {
        weighted_sum += position.coords * *mass;
        total_mass += mass;
    }

    if total_mass > MASS_EPSILON {
        Some(Point3::from(weighted_sum / total_mass))
    } else {
        None
    }
}

pub fn inertia_tensor(mass_points: &[(f64, Point3<f64>)], origin: &Point3<f64>) -> Matrix3<f64> {
    let mut tensor = Matrix3::zeros();

    for (mass, position) in mass_points {
        let r = position - origin;
        tensor[(0, 0)] += mass * (r.y * r.y + r.z * r.z);
        tensor[(1, 1)] += mass * (r.x * r.x + r.z * r.z);
        tensor[(2, 2)] += mass * (r.x * r.x + r.y * r.y);
        tensor[(0, 1)] -= mass * r.x * r.y;
        tensor[(0, 2)] -= mass * r.x * r.z;
        tensor[(1, 2)] -= mass * r.y * r.z;
    }

    tensor[(1, 0)] = tensor[(0, 1)];
    tensor[(2, 0)] = tensor[(0, 2)];
    tensor[(2, 1)] = tensor[(1, 2)];

    tensor
}

pub fn principal_moments(mass_points: &[(f64, Point3<f64>)]) -> Option<Vector3<f64>> {
    let com = center_of_mass(mass_points)?;
    let tensor = inertia_tensor(mass_points, &com);

    let eigen = SymmetricEigen::new(tensor);
    let mut moments = [
        eigen.eigenvalues[0],
        eigen.eigenvalues[1],
        eigen.eigenvalues[2],
    ];
    moments.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Some(Vector3::new(moments[0], moments[1], moments[2]))
}
