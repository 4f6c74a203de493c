/*!
# Saving Samples to CSV

Writes a sample buffer of shape `(n_samples, n_chains)` in long format: one row per
stored draw with columns `chain`, `sample` and `value`. Enable via the `csv` feature.
*/

use ndarray::{Array2, Axis};
use std::error::Error;
use std::fs::File;
use std::io::Write;

use csv::Writer;

/**
Writes `samples` to any writer in long format, chain by chain.

NaN entries (unfilled buffer slots) are written as `NaN`.

```rust
use ndarray::arr2;
use rvs_mcmc::io::csv::write_csv;

let samples = arr2(&[[0.5, 1.5], [0.25, 2.0]]);
let mut out = Vec::new();
write_csv(&samples, &mut out)?;
assert_eq!(
    String::from_utf8(out)?,
    "chain,sample,value\n0,0,0.5\n0,1,0.25\n1,0,1.5\n1,1,2\n"
);
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/
pub fn write_csv<W: Write>(samples: &Array2<f64>, writer: W) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["chain", "sample", "value"])?;
    for (chain, column) in samples.axis_iter(Axis(1)).enumerate() {
        for (sample, value) in column.iter().enumerate() {
            wtr.write_record(&[chain.to_string(), sample.to_string(), value.to_string()])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Saves `samples` to `filename`, see [`write_csv`].
pub fn save_csv(samples: &Array2<f64>, filename: &str) -> Result<(), Box<dyn Error>> {
    write_csv(samples, File::create(filename)?)
}
