//! Basic example of solving a linear system with an LU factorization.

use pivlu::prelude::*;

fn main() -> Result<()> {
    println!("pivlu - Basic Example\n");
    println!("{}\n", pivlu::version_info());

    // A small system whose first pivot forces a row swap
    let a = Mat::from_row_major(
        &[
            1.0f64, 2.0, 3.0, //
            4.0, 5.0, 6.0, //
            7.0, 8.0, 10.0, //
        ],
        3,
        3,
    );
    let b = Mat::from_row_major(&[6.0f64, 15.0, 25.0], 3, 1);

    println!("Matrix A (3x3):");
    print_matrix(&a);

    let lu = lu_factor(a.as_ref())?;

    println!("\nL:");
    print_matrix(&lu.l());
    println!("\nU:");
    print_matrix(&lu.u());
    println!("\nTranspositions: {:?}", lu.transpositions());
    println!("Row permutation: {:?}", lu.permutation().inverse());
    println!("Determinant: {:.4}", lu.determinant());

    let x = lu.solve(b.as_ref())?;
    println!("\nSolution of A x = [6, 15, 25]:");
    print_matrix(&x);

    let residual = a.matmul(&x).max_abs_diff(&b);
    println!("Max residual: {:.2e}", residual);

    println!("\nInverse:");
    print_matrix(&lu.inverse());

    // A singular matrix factors without error
    println!("\n--- Singular Input ---\n");
    let s = Mat::from_row_major(&[1.0f64, 2.0, 2.0, 4.0], 2, 2);
    let lu = lu_factor(s.as_ref())?;
    println!("Status: {:?}", lu.status());
    println!("Invertible: {}", lu.is_invertible());
    println!("Determinant: {}", lu.determinant());

    Ok(())
}

fn print_matrix(m: &Mat<f64>) {
    for i in 0..m.nrows() {
        print!("  [");
        for j in 0..m.ncols() {
            if j > 0 {
                print!(", ");
            }
            print!("{:8.4}", m[(i, j)]);
        }
        println!("]");
    }
}
