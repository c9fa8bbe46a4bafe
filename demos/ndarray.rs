use ndarray::{array, Axis};
use sdr_knn::{Classifier, FeatureVector, Knn, LabeledExample};

fn main() {
    let a = array![[1.0, 2.0], [2.0, 3.0], [3.0, 4.0], [3.0, 2.0]];
    let labels = ["low", "low", "high", "high"];

    let training = a
        .axis_iter(Axis(0))
        .zip(labels)
        .map(|(row, label)| LabeledExample::new(row.to_vec(), label))
        .collect();
    let knn = Knn::new(training).expect("rows share one width").k(3);

    for row in a.rows() {
        println!(
            "Closest 3 rows (closest to furthest) to {:?}:",
            row.as_slice().unwrap()
        );
        for (neighbor, label) in knn.neighbors(row.as_slice().unwrap()).unwrap() {
            println!(
                "{:?} {} at {:.3}",
                knn.features()[neighbor.index].as_slice(),
                label,
                neighbor.distance
            );
        }
    }

    let queries: Vec<FeatureVector> = array![[0.0, 0.0], [4.0, 4.0]]
        .rows()
        .into_iter()
        .map(|row| FeatureVector::from(row.to_vec()))
        .collect();
    println!("Predicted: {:?}", knn.classify(&queries).unwrap());
}
